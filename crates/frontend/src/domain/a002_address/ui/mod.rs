pub mod cascade;
