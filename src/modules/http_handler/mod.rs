//! # HTTP Pipeline
//!
//! Request and response types plus the middleware chain that the bot filter
//! plugs into. The server that accepts connections lives outside this crate;
//! it hands each parsed [`Request`] to a [`MiddlewareChain`] and writes back
//! whatever [`Response`] comes out.
//!
//! ## Example
//!
//! ```rust,ignore
//! use botgate::modules::http_handler::{MiddlewareChain, NoCacheMiddleware, Response};
//!
//! let chain = MiddlewareChain::new().with(Arc::new(NoCacheMiddleware::new()));
//! let response = chain.dispatch(request, |_| Response::ok().text("hello").build())?;
//! ```

pub mod error;
pub mod middleware;
pub mod request;
pub mod response;

pub use error::{HttpError, HttpResult};
pub use middleware::{Middleware, MiddlewareAction, MiddlewareChain, NoCacheMiddleware};
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseBuilder};
