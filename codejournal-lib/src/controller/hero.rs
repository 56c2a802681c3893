/// A slide of the home view's carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    pub title: &'static str,
    pub text: &'static str,
    pub image_url: &'static str,
}

pub const SLIDES: [Slide; 3] = [
    Slide {
        title: "Capture your coding thoughts",
        text: "Log bugs, breakthroughs, and notes before you forget them.",
        image_url: "stock-image-all-one-place.jpg",
    },
    Slide {
        title: "Stay organized over time",
        text: "Scroll back through your entries to see how your skills grow.",
        image_url: "organized.jpg",
    },
    Slide {
        title: "All your entries in one place",
        text: "Create, read, update, and delete blog-style posts in seconds.",
        image_url: "image.png",
    },
];

/// Position within [`SLIDES`]. Always in range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
}

impl Carousel {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide(&self) -> &'static Slide {
        let [first, ..] = &SLIDES;
        SLIDES.get(self.index).unwrap_or(first)
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % SLIDES.len();
    }

    pub fn prev(&mut self) {
        self.index = self.index.checked_sub(1).unwrap_or(SLIDES.len() - 1);
    }

    /// Jump to slide `index`. Out of range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < SLIDES.len() {
            self.index = index;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wraps() {
        let mut carousel = Carousel::default();

        carousel.prev();
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.slide().image_url, "image.png");

        carousel.next();
        assert_eq!(carousel.index(), 0);

        carousel.next();
        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_select() {
        let mut carousel = Carousel::default();

        carousel.select(1);
        assert_eq!(carousel.slide().title, "Stay organized over time");

        carousel.select(3);
        assert_eq!(carousel.index(), 1);
    }
}
