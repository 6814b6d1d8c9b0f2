pub mod top_workplaces;
