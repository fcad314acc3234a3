//! Checked-in output of `smartvo instrument` for company.json and
//! office.json. `codegen_schema` keeps it in sync with the emitter.

pub mod company;
pub mod office;
