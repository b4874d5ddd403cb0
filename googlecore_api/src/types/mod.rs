mod arguments;
pub use self::arguments::{Arguments, API_KEY_ARG, PAGE_TOKEN_ARG};

mod response;
pub use self::response::{Response, NEXT_PAGE_TOKEN_FIELD};
