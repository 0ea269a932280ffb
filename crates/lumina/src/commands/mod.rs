//! CLI command implementations.

pub(crate) mod comments;
pub(crate) mod edit;
pub(crate) mod generate;
pub(crate) mod posts;
pub(crate) mod render;
pub(crate) mod session;

pub(crate) use comments::CommentsCommand;
pub(crate) use edit::EditArgs;
pub(crate) use generate::GenerateArgs;
pub(crate) use posts::PostsCommand;
pub(crate) use render::RenderArgs;
pub(crate) use session::SessionCommand;
