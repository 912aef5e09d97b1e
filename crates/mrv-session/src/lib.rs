// mrv-session: SSH command transport for network switches.
//
// Provides the `DeviceSession` contract consumed by mrv-core and its
// concrete `SshSession` implementation over russh. The session layer
// knows nothing about multicast — it opens a shell transport, runs one
// command at a time, and hands raw text back.

pub mod error;
pub mod session;
pub mod transport;

pub use error::Error;
pub use session::{DeviceSession, SshSession, probe_reachable};
pub use transport::TransportConfig;
