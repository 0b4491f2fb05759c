//! Gameobject handles

slotmap::new_key_type! {
    /// Generational handle to a live gameobject
    ///
    /// Handles are issued by the `SceneManager`. A handle to a destroyed
    /// gameobject never resolves again, even if its slot is reused.
    pub struct GameObjectId;
}
