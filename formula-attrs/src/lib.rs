mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// The report of the error is described with the `error` attribute:
/// ```
/// use formula_attrs::ErrorKind;
/// use formula_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of input", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                    |
/// | ----------- | ------------------------------------------------------------------------------ |
/// | `message`   | The message displayed at the top of the report. Required.                      |
/// | `labels`    | An iterable of label texts. The `n`th label points at the `n`th span of the error. |
/// | `help`      | Optional help text, describing what the user can do to fix the error.          |
///
/// Each tag accepts an arbitrary expression. For structs with named fields, the expression is
/// evaluated with the fields of the struct in scope. Tuple structs are rejected.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
