//! Element builders for the four protocol extensions.
//!
//! | Extension | Root element | Namespace prefix |
//! |---|---|---|
//! | **Image** | `image:image` | `image` |
//! | **Video** | `video:video` | `video` |
//! | **News** | `news:news` | `news` |
//! | **Alternate language** | `xhtml:link` | `xhtml` |
//!
//! Each module exposes `write`, which appends the extension's elements to an
//! open `<url>`. Extensions with constraints also expose `validate`; `write`
//! calls it first, so a builder never emits an invalid element.

pub mod alternate;
pub mod image;
pub mod news;
pub mod video;
