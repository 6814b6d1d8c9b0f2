pub mod page;
pub mod report;
pub mod shifts;
pub mod workplaces;
