use stk_derive::stk_error;
use std::borrow::Cow;

#[stk_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing section{}: {message}", format_context(.context))]
    MissingSection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: DemoError = "boom".into();
    let _ = err.to_string();
}
