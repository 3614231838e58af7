/// Source-control / editor gate consulted before every structural edit
pub trait ProjectEditor: Send + Sync {
    /// Try to make the project file editable; false means the edit must be abandoned
    fn checkout_for_edit(&self) -> bool;
}
