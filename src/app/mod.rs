// PeerLens - app/mod.rs
//
// Application orchestration layer: the peer-source boundary and the
// view state that drives display and export. Feeds raw records into
// the core pipeline; core never performs I/O itself.

pub mod source;
pub mod state;
