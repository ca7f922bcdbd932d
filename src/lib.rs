/// REST client for `/tasks`: the `TaskApi` trait and its reqwest implementation.
pub mod api;
/// CLI subcommands and terminal capabilities.
pub mod commands;
/// SQLite store for the reference backend.
pub mod db;
/// Task records and their Priority and Status options.
pub mod models;
/// Terminal rendering of the detail card and edit form.
pub mod render;
/// The edit view model: load, edit, submit, delete.
pub mod view;
/// Axum-based reference backend and router.
pub mod web;
