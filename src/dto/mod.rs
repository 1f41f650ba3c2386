pub mod auth_dto;
pub mod candidate_dto;
pub mod messaging_dto;
pub mod template_dto;
