pub(crate) mod ast;
pub(crate) mod refract;
pub(crate) mod schema;
