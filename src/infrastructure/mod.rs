//! Infrastructure layer - Process-wide concerns such as logging

pub mod logging;
