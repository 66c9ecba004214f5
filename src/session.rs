use std::ops::Deref;

use crate::chat_log::ChatLog;
use crate::config::{Configuration, ModelPaths, CONFIG_FAILED};
use crate::dispatch::{PendingReply, Reply};
use crate::error::{ConfigError, ModelLoadError};
use crate::input::InputController;
use crate::model::Classifier;
use crate::types::Role;
use crate::upload::UploadController;

pub const MODEL_LOAD_FAILED: &str = "Model failed to load.";
pub const IMAGE_UPLOADED: &str = "Image uploaded. Ready to classify!";
pub const IMAGE_UNREADABLE: &str = "Could not read that image. Please choose another file.";

/// All state for one chat session: configuration, model handle,
/// transcript, text entry and the staged upload.
///
/// `C` is the classifier, `U` the owner of an image's temporary URL.
pub struct Session<C: Classifier, U> {
    config: Option<Configuration>,
    status_line: String,
    version_label: Option<String>,
    model: Option<C>,
    transcript: ChatLog,
    input: InputController,
    upload: UploadController<U, C::Input>,
    busy: bool,
}

impl<C, U> Default for Session<C, U>
where
    C: Classifier,
    U: Deref<Target = str>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, U> Session<C, U>
where
    C: Classifier,
    U: Deref<Target = str>,
{
    pub fn new() -> Self {
        Self {
            config: None,
            status_line: String::new(),
            version_label: None,
            model: None,
            transcript: ChatLog::new(),
            input: InputController::new(),
            upload: UploadController::new(),
            busy: false,
        }
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub fn version_label(&self) -> Option<&str> {
        self.version_label.as_deref()
    }

    pub fn transcript(&self) -> &ChatLog {
        &self.transcript
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputController {
        &mut self.input
    }

    pub fn upload(&self) -> &UploadController<U, C::Input> {
        &self.upload
    }

    pub fn model_ready(&self) -> bool {
        self.model.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Stores the fetched configuration and updates the footer.
    pub fn apply_config(&mut self, result: Result<Configuration, ConfigError>) {
        let config = match result {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load config: {e}");
                self.status_line = CONFIG_FAILED.to_string();
                return;
            }
        };

        match config.footer_text() {
            Some(text) => self.status_line = text,
            None => {
                log::warn!("config is missing project name, version or license");
                self.status_line = CONFIG_FAILED.to_string();
            }
        }
        self.version_label = config.version_label();
        self.config = Some(config);
    }

    pub fn model_paths(&self) -> Result<ModelPaths, ModelLoadError> {
        self.config
            .as_ref()
            .ok_or(ModelLoadError::MissingConfig)?
            .model_paths()
    }

    pub fn apply_model(&mut self, result: Result<C, ModelLoadError>) {
        match result {
            Ok(model) => {
                let name = self
                    .config
                    .as_ref()
                    .and_then(|c| c.model_name())
                    .unwrap_or("unnamed model");
                log::info!("model loaded: {name}");
                self.model = Some(model);
            }
            Err(e) => {
                log::error!("failed to load model: {e}");
                self.transcript.append_text(Role::Assistant, MODEL_LOAD_FAILED);
            }
        }
    }

    /// Logs the submitted text and snapshots what the reply needs.
    /// Returns `None` while a reply is outstanding or when the input holds
    /// only whitespace.
    pub fn begin_submit(&mut self) -> Option<PendingReply<C>> {
        if self.busy {
            log::debug!("submit ignored: reply in progress");
            return None;
        }
        let text = self.input.submit()?;
        self.transcript.append_text(Role::User, text);
        self.busy = true;

        Some(PendingReply {
            model: self.model.clone(),
            image: self.upload.staged().map(|staged| staged.element.clone()),
        })
    }

    pub fn finish_submit(&mut self, reply: Reply) {
        if let Reply::Failed(e) = &reply {
            log::error!("prediction failed: {e}");
        }
        self.transcript.append_text(Role::Assistant, reply.message());
        self.input.settle();
        self.busy = false;
    }

    /// A file was picked. Returns the URL to bind to the preview element.
    pub fn select_image(&mut self, url: U, name: impl Into<String>) -> &str {
        self.upload.select(url, name)
    }

    /// The preview element finished loading the pending image.
    pub fn image_loaded(&mut self, element: C::Input) {
        let Some(staged) = self.upload.loaded(element) else {
            return;
        };
        let (src, alt) = ((*staged.url).to_string(), staged.name.clone());
        self.transcript.append_image(Role::User, src, alt);
        self.transcript.append_text(Role::Assistant, IMAGE_UPLOADED);
    }

    pub fn image_failed(&mut self) {
        if let Some(name) = self.upload.failed() {
            log::warn!("could not load image {name}");
            self.transcript.append_text(Role::Assistant, IMAGE_UNREADABLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::FixedClassifier;
    use crate::dispatch::{MODEL_NOT_READY, NO_IMAGE};
    use crate::types::{ChatEntry, Content, Prediction};
    use crate::upload::tests::TrackedUrl;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    type TestSession = Session<FixedClassifier, TrackedUrl>;

    fn submit(session: &mut TestSession, text: &str) -> bool {
        session.input_mut().edit(text.to_string());
        match session.begin_submit() {
            Some(pending) => {
                let reply = block_on(pending.resolve());
                session.finish_submit(reply);
                true
            }
            None => false,
        }
    }

    fn texts(session: &TestSession) -> Vec<(Role, String)> {
        session
            .transcript()
            .entries()
            .iter()
            .filter_map(|e| e.text().map(|t| (e.role, t.to_string())))
            .collect()
    }

    fn ready_model() -> Result<FixedClassifier, ModelLoadError> {
        Ok(FixedClassifier(Ok(vec![
            Prediction::new("A", 0.3),
            Prediction::new("B", 0.9),
        ])))
    }

    fn stage(session: &mut TestSession, live: &Rc<Cell<usize>>, name: &str) {
        session.select_image(TrackedUrl::new(&format!("blob:{name}"), live), name);
        session.image_loaded("img");
    }

    #[test]
    fn test_config_footer() {
        let mut session = TestSession::new();
        session.apply_config(Configuration::from_json(
            r#"{"project": {"name": "Pebble", "version": "0.3", "license": "MIT"}}"#,
        ));
        assert_eq!(session.status_line(), "Pebble v0.3 — MIT License");
        assert_eq!(session.version_label(), Some("Version 0.3"));
    }

    #[test]
    fn test_incomplete_config_shows_failure() {
        let mut session = TestSession::new();
        session.apply_config(Configuration::from_json(
            r#"{"project": {"name": "Pebble", "version": "0.3"}}"#,
        ));
        assert_eq!(session.status_line(), CONFIG_FAILED);

        let mut session = TestSession::new();
        session.apply_config(Err(ConfigError::Status(404)));
        assert_eq!(session.status_line(), CONFIG_FAILED);
        assert_eq!(session.model_paths(), Err(ModelLoadError::MissingConfig));
    }

    #[test]
    fn test_model_failure_logs_one_message() {
        let mut session = TestSession::new();
        session.apply_model(Err(ModelLoadError::MissingPaths));

        assert!(!session.model_ready());
        assert_eq!(
            texts(&session),
            vec![(Role::Assistant, MODEL_LOAD_FAILED.to_string())]
        );
    }

    #[test]
    fn test_classifies_staged_image() {
        let live = Rc::new(Cell::new(0));
        let mut session = TestSession::new();
        session.apply_model(ready_model());
        stage(&mut session, &live, "stone.png");

        assert!(submit(&mut session, "what is it?"));

        let entries = session.transcript().entries();
        assert_eq!(
            entries[0].content,
            Content::Image {
                src: "blob:stone.png".to_string(),
                alt: "stone.png".to_string()
            }
        );
        assert_eq!(entries[1], ChatEntry::assistant(IMAGE_UPLOADED.to_string()));
        assert_eq!(entries[2], ChatEntry::user("what is it?".to_string()));
        assert_eq!(
            entries[3],
            ChatEntry::assistant("I think this is B (90.0%)".to_string())
        );
        assert_eq!(session.input().value(), "");
        assert!(!session.is_busy());
    }

    #[test]
    fn test_no_image_reply() {
        let mut session = TestSession::new();
        session.apply_model(ready_model());
        assert!(submit(&mut session, "hello"));

        assert_eq!(
            texts(&session),
            vec![
                (Role::User, "hello".to_string()),
                (Role::Assistant, NO_IMAGE.to_string()),
            ]
        );
    }

    #[test]
    fn test_model_not_ready_reply() {
        let live = Rc::new(Cell::new(0));
        let mut session = TestSession::new();
        stage(&mut session, &live, "a.png");
        submit(&mut session, "hello");

        assert_eq!(
            session.transcript().last().and_then(|e| e.text()),
            Some(MODEL_NOT_READY)
        );
    }

    #[test]
    fn test_whitespace_submit_adds_nothing() {
        let mut session = TestSession::new();
        assert!(!submit(&mut session, "   \n "));
        assert!(session.transcript().is_empty());
        assert_eq!(session.input().value(), "   \n ");
    }

    #[test]
    fn test_submit_not_reentrant() {
        let mut session = TestSession::new();
        session.input_mut().edit("one".to_string());
        let pending = session.begin_submit().unwrap();
        assert!(session.is_busy());

        session.input_mut().edit("two".to_string());
        assert!(session.begin_submit().is_none());
        assert_eq!(session.input().value(), "two");

        session.finish_submit(block_on(pending.resolve()));
        assert!(!session.is_busy());
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_failed_image_surfaces_message() {
        let live = Rc::new(Cell::new(0));
        let mut session = TestSession::new();
        session.select_image(TrackedUrl::new("blob:x", &live), "x.bin");
        session.image_failed();

        assert_eq!(live.get(), 0);
        assert_eq!(
            texts(&session),
            vec![(Role::Assistant, IMAGE_UNREADABLE.to_string())]
        );
        assert!(session.upload().staged().is_none());
    }

    #[test]
    fn test_reupload_releases_previous() {
        let live = Rc::new(Cell::new(0));
        let mut session = TestSession::new();
        stage(&mut session, &live, "a.png");
        stage(&mut session, &live, "b.png");

        assert_eq!(live.get(), 1);
        assert_eq!(
            session.upload().staged().map(|s| s.name.as_str()),
            Some("b.png")
        );
    }
}
