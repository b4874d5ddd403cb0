//! Static API definitions: the discoverable method surface a [`Transport`]
//! exposes.
//!
//! Each API is a table of [`ApiMethod`]s declared as `'static` data. The
//! client layer walks [`ApiDefinition::method_names`] to build its wrappers,
//! so adding an endpoint means adding one entry here.
//!
//! [`Transport`]: crate::Transport

mod maps;
pub use self::maps::MAPS;

use std::fmt;

use crate::types::{Arguments, PAGE_TOKEN_ARG};
use crate::Error;

/// Prefix marking the asynchronous variant of a method.
pub const ASYNC_PREFIX: &str = "async_";

/// Splits an `async_`-prefixed name into its base method name.
pub fn split_async(name: &str) -> Option<&str> {
    name.strip_prefix(ASYNC_PREFIX).filter(|base| !base.is_empty())
}

/// HTTP verb used for a method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// One callable endpoint.
#[derive(Debug, PartialEq, Eq)]
pub struct ApiMethod {
    /// Method name exposed to callers (e.g. `get_nearby_search`).
    pub name: &'static str,
    pub http_method: HttpMethod,
    /// Path appended to the definition's base URL.
    pub path: &'static str,
    pub required_args: &'static [&'static str],
    pub optional_args: &'static [&'static str],
    /// Whether responses may carry a `next_page_token`.
    pub paginated: bool,
    pub doc: &'static str,
}

impl ApiMethod {
    /// Checks that every required argument is present.
    ///
    /// Continuation calls carry only the page token, so the check is skipped
    /// when one is supplied.
    pub fn check_arguments(&self, args: &Arguments) -> Result<(), Error> {
        if args.contains(PAGE_TOKEN_ARG) {
            return Ok(());
        }
        match self.required_args.iter().find(|name| !args.contains(name)) {
            Some(missing) => Err(Error::MissingArgument {
                method: self.name.to_string(),
                argument: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// A named API: base URL plus its method table.
#[derive(Debug)]
pub struct ApiDefinition {
    pub name: &'static str,
    pub base_url: &'static str,
    pub methods: &'static [ApiMethod],
}

impl ApiDefinition {
    pub fn method(&self, name: &str) -> Option<&'static ApiMethod> {
        let methods: &'static [ApiMethod] = self.methods;
        methods.iter().find(|m| m.name == name)
    }

    /// Every discoverable method name: each base method followed by its
    /// `async_` variant.
    pub fn method_names(&self) -> Vec<String> {
        self.methods
            .iter()
            .flat_map(|m| [m.name.to_string(), format!("{}{}", ASYNC_PREFIX, m.name)])
            .collect()
    }
}
