pub mod aggregate;
pub mod cli;
pub mod dates;
pub mod error;
pub mod github;
pub mod model;
pub mod page;
pub mod policy;
pub mod report;
pub mod repos;
