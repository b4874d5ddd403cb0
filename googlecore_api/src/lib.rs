mod client;
mod errors;
mod pool;
pub mod resource;
mod transport;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::pool::{WorkerPool, DEFAULT_MAX_WORKERS};
pub use self::resource::{split_async, ApiDefinition, ApiMethod, HttpMethod, ASYNC_PREFIX, MAPS};
pub use self::transport::Transport;
