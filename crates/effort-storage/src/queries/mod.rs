//! SQL for the registry tables. Every function takes a borrowed connection
//! so callers choose between the writer and the read pool.

pub mod models;
