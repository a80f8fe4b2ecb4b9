//! The network message schema and the server lobby. Sockets are left to the caller.

pub mod lobby;
pub mod protocol;
