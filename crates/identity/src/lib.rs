//! Identity for the welfare gate: user directory, session store, and the
//! fail-closed resolver that turns a session token into a principal.

pub mod backend;
pub mod directory;
pub mod resolver;
pub mod session;

pub use backend::{DirectoryError, Identity, IdentityBackend, MemoryBackend};
pub use directory::{AdminError, UserDirectory, UserPage, UserRecord};
pub use resolver::SessionResolver;
pub use session::{SessionRecord, SessionStore};
