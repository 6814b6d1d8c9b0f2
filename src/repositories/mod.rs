pub mod pagination;
pub mod shifts;
pub mod workplaces;
