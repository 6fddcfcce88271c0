integer_enum! {
    /// <https://developer.valvesoftware.com/wiki/Steam_Web_API#Public_Data>
    ///
    /// The Web API only ever reports [`CommunityVisibilityState::Private`] or
    /// [`CommunityVisibilityState::Public`], "friends only" profiles show up as private.
    pub enum CommunityVisibilityState ("community visibility state as an integer in 1..=3") {
        Private = 1,
        FriendsOnly = 2,
        Public = 3,
    }
}
