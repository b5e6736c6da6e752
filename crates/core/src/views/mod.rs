pub mod layout;
pub mod readout;
