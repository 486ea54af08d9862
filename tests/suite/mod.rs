mod async_lifting;
mod capture;
mod collections;
mod config;
mod laws;
