//! Palabras clave de acción para los pasos de ciclo de vida.
//!
//! Los pasos `BEFORE`/`AFTER` usan su `action` como etiqueta que el motor de
//! ejecución interpreta. Estos son los dos valores que el builder resuelve por
//! sí mismo; cualquier otro string lo aporta el autor del escenario.

/// Acción asignada cuando el hook es una función a ejecutar.
pub const EXECUTE_FUNCTION: &str = "EXECUTE_FUNCTION";

/// Acción por defecto cuando el hook no trae un nombre de acción utilizable.
pub const SET_STATE: &str = "SET_STATE";
