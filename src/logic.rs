//! Diagnostics over whole scripts.
crate::reexport!(position);
crate::reexport!(marker);
crate::reexport!(validator);
