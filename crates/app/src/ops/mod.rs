pub mod add;
pub mod init;
pub mod ls;
pub mod rm;
pub mod service;
pub mod version;

pub use add::Add;
pub use init::Init;
pub use ls::Ls;
pub use rm::Rm;
pub use service::Service;
pub use version::Version;
