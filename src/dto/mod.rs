pub mod api_dto;
pub mod fleet_dto;
