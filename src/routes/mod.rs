/**
 * Routes Module
 * API route handlers
 */

pub mod auth;
pub mod backup;
pub mod health;
pub mod sections;
pub mod settings;
