//! Category and sort order codes used in listing URLs
//!
//! The site follows the convention that odd order codes sort descending and
//! even codes sort ascending.

/// Sort orders for search listings
pub mod orders {
    pub mod name {
        pub const DESC: u32 = 1;
        pub const ASC: u32 = 2;
    }
    pub mod uploaded {
        pub const DESC: u32 = 3;
        pub const ASC: u32 = 4;
    }
    pub mod size {
        pub const DESC: u32 = 5;
        pub const ASC: u32 = 6;
    }
    pub mod seeders {
        pub const DESC: u32 = 7;
        pub const ASC: u32 = 8;
    }
    pub mod leechers {
        pub const DESC: u32 = 9;
        pub const ASC: u32 = 10;
    }
    pub mod uploader {
        pub const DESC: u32 = 11;
        pub const ASC: u32 = 12;
    }
    /// Sort by category ("type" on the site)
    pub mod kind {
        pub const DESC: u32 = 13;
        pub const ASC: u32 = 14;
    }

    /// Default order of a search
    pub const DEFAULT: u32 = seeders::DESC;
}

/// Category filters for search and top listings
pub mod categories {
    /// No filtering
    pub const ALL: u32 = 0;

    pub mod audio {
        pub const ALL: u32 = 100;
        pub const MUSIC: u32 = 101;
        pub const AUDIO_BOOKS: u32 = 102;
        pub const SOUND_CLIPS: u32 = 103;
        pub const FLAC: u32 = 104;
        pub const OTHER: u32 = 199;
    }
    pub mod video {
        pub const ALL: u32 = 200;
        pub const MOVIES: u32 = 201;
        pub const MOVIES_DVDR: u32 = 202;
        pub const MUSIC_VIDEOS: u32 = 203;
        pub const MOVIE_CLIPS: u32 = 204;
        pub const TV_SHOWS: u32 = 205;
        pub const HANDHELD: u32 = 206;
        pub const HD_MOVIES: u32 = 207;
        pub const HD_TV_SHOWS: u32 = 208;
        pub const THREE_DIMENSIONS: u32 = 209;
        pub const OTHER: u32 = 299;
    }
    pub mod applications {
        pub const ALL: u32 = 300;
        pub const WINDOWS: u32 = 301;
        pub const MAC: u32 = 302;
        pub const UNIX: u32 = 303;
        pub const HANDHELD: u32 = 304;
        pub const IOS: u32 = 305;
        pub const ANDROID: u32 = 306;
        pub const OTHER: u32 = 399;
    }
    pub mod games {
        pub const ALL: u32 = 400;
        pub const PC: u32 = 401;
        pub const MAC: u32 = 402;
        pub const PSX: u32 = 403;
        pub const XBOX360: u32 = 404;
        pub const WII: u32 = 405;
        pub const HANDHELD: u32 = 406;
        pub const IOS: u32 = 407;
        pub const ANDROID: u32 = 408;
        pub const OTHER: u32 = 499;
    }
    pub mod porn {
        pub const ALL: u32 = 500;
        pub const MOVIES: u32 = 501;
        pub const MOVIES_DVDR: u32 = 502;
        pub const PICTURES: u32 = 503;
        pub const GAMES: u32 = 504;
        pub const HD_MOVIES: u32 = 505;
        pub const MOVIE_CLIPS: u32 = 506;
        pub const OTHER: u32 = 599;
    }
    pub mod other {
        pub const ALL: u32 = 600;
        pub const EBOOKS: u32 = 601;
        pub const COMICS: u32 = 602;
        pub const PICTURES: u32 = 603;
        pub const COVERS: u32 = 604;
        pub const PHYSIBLES: u32 = 605;
        pub const OTHER: u32 = 699;
    }
}
