pub mod account_mapper;
pub mod act_mapper;
