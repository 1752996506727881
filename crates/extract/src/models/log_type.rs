registry! {
    /// Log types, keyed by the id in the site's log icons.
    pub enum LogType {
        Found = ("found", 2, "Found it"),
        DidNotFind = ("dnf", 3, "Didn't find it"),
        Note = ("note", 4, "Write note"),
        Archive = ("archive", 5, "Archive"),
        NeedsArchived = ("needs_archived", 7, "Needs Archived"),
        WillAttend = ("will_attend", 9, "Will Attend"),
        Attended = ("attended", 10, "Attended"),
        WebcamPhotoTaken = ("webcam_photo_taken", 11, "Webcam Photo Taken"),
        Unarchive = ("unarchive", 12, "Unarchive"),
        Disable = ("disable", 22, "Temporarily Disable Listing"),
        Enable = ("enable", 23, "Enable Listing"),
        Publish = ("publish", 24, "Publish Listing"),
        NeedsMaintenance = ("needs_maintenance", 45, "Needs Maintenance"),
        OwnerMaintenance = ("owner_maintenance", 46, "Owner Maintenance"),
        UpdateCoordinates = ("update_coordinates", 47, "Update Coordinates"),
        ReviewerNote = ("reviewer_note", 68, "Post Reviewer Note"),
        Announcement = ("announcement", 74, "Announcement"),
    }
}
