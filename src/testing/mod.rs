mod scripted_model;
mod template_fixture;

pub use scripted_model::ScriptedModel;
pub use template_fixture::TemplateFixture;
