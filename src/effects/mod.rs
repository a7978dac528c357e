pub(crate) mod blend;
pub(crate) mod influence;
pub(crate) mod mask;
