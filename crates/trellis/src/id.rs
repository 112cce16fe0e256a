use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a node stored in the [`Ui`](crate::Ui) arena.
    pub struct NodeId;

    /// Handle returned when registering an event listener.
    pub struct ListenerId;

    /// Handle for a scheduled animation.
    pub struct AnimationId;
}
