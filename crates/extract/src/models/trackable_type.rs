registry! {
    /// Trackable types as listed on the site.
    ///
    /// ```
    /// use gc_extract::models::{Registry, TrackableType};
    ///
    /// let kind = TrackableType::for_id(21).unwrap();
    /// assert!(kind.is("travel_bug_dog_tag"));
    /// assert_eq!(kind.to_string(), "Travel Bug Dog Tag");
    /// ```
    pub enum TrackableType {
        TravelBugDogTag = ("travel_bug_dog_tag", 21, "Travel Bug Dog Tag"),
    }
}
