use std::ops::Deref;

/// An upload whose preview element has not reported `load` yet.
#[derive(Debug)]
pub struct PendingUpload<U> {
    pub url: U,
    pub name: String,
}

/// The image currently selected for classification.
#[derive(Debug)]
pub struct StagedImage<U, I> {
    pub url: U,
    pub name: String,
    pub element: I,
}

/// Tracks the single live temporary image URL.
///
/// `U` owns the URL and releases it when dropped (`gloo::file::ObjectUrl`
/// in the browser). `I` is the loaded element handed to the classifier.
/// At most one of `pending` and `staged` is set at any time.
#[derive(Debug)]
pub struct UploadController<U, I> {
    pending: Option<PendingUpload<U>>,
    staged: Option<StagedImage<U, I>>,
}

impl<U, I> Default for UploadController<U, I> {
    fn default() -> Self {
        Self {
            pending: None,
            staged: None,
        }
    }
}

impl<U, I> UploadController<U, I>
where
    U: Deref<Target = str>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new upload. Any previous URL is released before the new
    /// one is stored.
    pub fn select(&mut self, url: U, name: impl Into<String>) -> &str {
        self.release();
        let pending = self.pending.insert(PendingUpload {
            url,
            name: name.into(),
        });
        &pending.url
    }

    /// The preview element loaded: promote the pending upload.
    pub fn loaded(&mut self, element: I) -> Option<&StagedImage<U, I>> {
        let PendingUpload { url, name } = self.pending.take()?;
        Some(self.staged.insert(StagedImage { url, name, element }))
    }

    /// The preview element failed: drop the pending upload and return its
    /// file name.
    pub fn failed(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.name)
    }

    pub fn staged(&self) -> Option<&StagedImage<U, I>> {
        self.staged.as_ref()
    }

    /// URL to bind to the preview element, staged or pending.
    pub fn preview_url(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .map(|p| &*p.url)
            .or_else(|| self.staged.as_ref().map(|s| &*s.url))
    }

    pub fn preview_name(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .map(|p| p.name.as_str())
            .or_else(|| self.staged.as_ref().map(|s| s.name.as_str()))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn release(&mut self) {
        if let Some(previous) = self.pending.take() {
            log::debug!("releasing pending upload {}", previous.name);
        }
        if let Some(previous) = self.staged.take() {
            log::debug!("releasing staged image {}", previous.name);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts live instances so tests can check release behaviour.
    #[derive(Debug)]
    pub(crate) struct TrackedUrl {
        url: String,
        live: Rc<Cell<usize>>,
    }

    impl TrackedUrl {
        pub(crate) fn new(url: &str, live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self {
                url: url.to_string(),
                live: live.clone(),
            }
        }
    }

    impl Deref for TrackedUrl {
        type Target = str;

        fn deref(&self) -> &str {
            &self.url
        }
    }

    impl Drop for TrackedUrl {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_select_then_load_stages() {
        let live = Rc::new(Cell::new(0));
        let mut upload = UploadController::<TrackedUrl, &str>::new();

        assert_eq!(upload.select(TrackedUrl::new("blob:1", &live), "a.png"), "blob:1");
        assert!(upload.is_pending());
        assert!(upload.staged().is_none());

        let staged = upload.loaded("img-a").unwrap();
        assert_eq!(staged.name, "a.png");
        assert_eq!(&*staged.url, "blob:1");
        assert_eq!(staged.element, "img-a");
        assert!(!upload.is_pending());
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn test_at_most_one_live_url() {
        let live = Rc::new(Cell::new(0));
        let mut upload = UploadController::<TrackedUrl, &str>::new();

        for i in 0..5 {
            let before = live.get();
            upload.select(TrackedUrl::new(&format!("blob:{i}"), &live), format!("{i}.png"));
            assert_eq!(live.get(), 1);
            if i > 0 {
                // replacing released exactly the previous one
                assert_eq!(before, 1);
            }
            if i % 2 == 0 {
                upload.loaded("img");
            }
            assert_eq!(live.get(), 1);
        }

        assert_eq!(upload.preview_url(), Some("blob:4"));
    }

    #[test]
    fn test_failed_load_releases_url() {
        let live = Rc::new(Cell::new(0));
        let mut upload = UploadController::<TrackedUrl, &str>::new();

        upload.select(TrackedUrl::new("blob:bad", &live), "bad.png");
        assert_eq!(upload.failed().as_deref(), Some("bad.png"));
        assert_eq!(live.get(), 0);
        assert!(upload.staged().is_none());
        assert!(upload.preview_url().is_none());
    }

    #[test]
    fn test_new_selection_unstages_previous() {
        let live = Rc::new(Cell::new(0));
        let mut upload = UploadController::<TrackedUrl, &str>::new();

        upload.select(TrackedUrl::new("blob:1", &live), "a.png");
        upload.loaded("img");
        upload.select(TrackedUrl::new("blob:2", &live), "b.png");

        assert!(upload.staged().is_none());
        assert_eq!(upload.preview_name(), Some("b.png"));
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn test_loaded_without_pending_is_ignored() {
        let mut upload = UploadController::<TrackedUrl, &str>::new();
        assert!(upload.loaded("img").is_none());
        assert!(upload.failed().is_none());
    }
}
