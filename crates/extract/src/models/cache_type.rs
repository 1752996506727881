registry! {
    /// Cache types, keyed by the id in the site's `WptTypes/<id>.gif` icons.
    pub enum CacheType {
        Traditional = ("traditional", 2, "Traditional Cache"),
        Multi = ("multi", 3, "Multi-cache"),
        Virtual = ("virtual", 4, "Virtual Cache"),
        Letterbox = ("letterbox", 5, "Letterbox Hybrid"),
        Event = ("event", 6, "Event Cache"),
        Mystery = ("mystery", 8, "Unknown Cache"),
        Ape = ("ape", 9, "Project APE Cache"),
        Webcam = ("webcam", 11, "Webcam Cache"),
        Locationless = ("locationless", 12, "Locationless (Reverse) Cache"),
        Cito = ("cito", 13, "Cache In Trash Out Event"),
        Earthcache = ("earthcache", 137, "Earthcache"),
        MegaEvent = ("megaevent", 453, "Mega-Event Cache"),
        Wherigo = ("wherigo", 1858, "Wherigo Cache"),
        LostAndFoundEvent = ("lfevent", 3653, "Lost and Found Event Cache"),
    }
}
