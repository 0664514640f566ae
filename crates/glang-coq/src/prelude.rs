// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Fixed framework preamble and the effects preamble/footer pairs.

/// Imported by every generated file.
pub const FRAMEWORK_IMPORT: &str = "From New.golang Require Import defn.";

/// Name of the effect-free configuration.
pub const NO_FFI: &str = "none";

/// Effects preamble and footer for a package's FFI configuration.
///
/// Effect-free packages are wrapped in a section over an abstract
/// `ffi_syntax`; anything else imports that FFI's prelude instead.
pub fn ffi_header_footer(ffi: &str) -> (String, String) {
    if ffi == NO_FFI {
        let header = [
            "Section code.",
            "Context `{ffi_syntax}.",
            "Local Coercion Var' s: expr := Var s.",
        ]
        .join("\n");
        (header, "\nEnd code.\n".to_string())
    } else {
        (
            format!("From New Require Import {}_prelude.", ffi),
            String::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_free_section() {
        let (header, footer) = ffi_header_footer("none");
        assert!(header.starts_with("Section code.\n"));
        assert!(header.ends_with("Var s."));
        assert_eq!(footer, "\nEnd code.\n");
    }

    #[test]
    fn ffi_prelude_import() {
        let (header, footer) = ffi_header_footer("grove");
        assert_eq!(header, "From New Require Import grove_prelude.");
        assert!(footer.is_empty());
    }
}
