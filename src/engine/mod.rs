pub(crate) mod best_dest;
pub(crate) mod direction;
pub(crate) mod labels;
pub(crate) mod paths;
pub(crate) mod queries;
pub(crate) mod raptor;
pub(crate) mod walking;
