//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the scraping/business logic so route handlers can
//! stay focused on parameter validation and protocol translation.

pub mod metadata;
