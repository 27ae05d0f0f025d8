/// Basic application code
pub mod app;
/// CMS editing form assembly
pub mod cms;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums
pub mod error;
/// Form field model shared by the CMS and the public form
pub mod forms;
/// Translation lookup
pub mod i18n;
/// Stored records and the data sources they are built from
pub mod model;
/// Default content provisioning
pub mod provision;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
