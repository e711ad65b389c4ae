// File: src/session.rs
//! Capture session: feeds every input change through date recognition for a
//! live preview and runs tag extraction once, when the capture is committed.
//!
//! The session does not know how it is displayed. A front end implements
//! [`CaptureSurface`] and forwards its key events as [`CaptureEvent`]s.
use crate::model::{CaptureRecord, ReferenceYear, extract_tags, format_preview, recognize_date};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Something that can show a capture prompt.
pub trait CaptureSurface {
    fn set_title(&mut self, title: &str);
    /// Replace the date echo under the input. Empty string clears it.
    fn show_preview(&mut self, preview: &str);
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Editing,
    Committed,
    Cancelled,
}

impl CaptureState {
    pub fn is_finished(&self) -> bool {
        matches!(self, CaptureState::Committed | CaptureState::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Full current content of the input field.
    Input(String),
    Commit,
    Cancel,
}

pub type CompletionHandler<'a> = Box<dyn FnOnce(CaptureRecord) + 'a>;
pub type Clock<'a> = Box<dyn Fn() -> NaiveDateTime + 'a>;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub struct CaptureSession<'a, S: CaptureSurface> {
    surface: S,
    title: String,
    state: CaptureState,
    clock: Clock<'a>,
    reference_year: ReferenceYear,
    raw_input: String,
    cleaned_input: String,
    recognized: Option<NaiveDate>,
    handler: Option<CompletionHandler<'a>>,
}

impl<'a, S: CaptureSurface> CaptureSession<'a, S> {
    pub fn new(surface: S) -> Self {
        let now = local_now();
        Self {
            surface,
            title: String::new(),
            state: CaptureState::Idle,
            clock: Box::new(local_now),
            reference_year: ReferenceYear::from_date(now.date()),
            raw_input: String::new(),
            cleaned_input: String::new(),
            recognized: None,
            handler: None,
        }
    }

    /// Replace the wall clock. The reference year is re-read from it.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'a) -> Self {
        self.reference_year = ReferenceYear::from_date(clock().date());
        self.clock = Box::new(clock);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Register the handler that receives the record on commit.
    pub fn on_enter(mut self, handler: impl FnOnce(CaptureRecord) + 'a) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn reference_year(&self) -> &ReferenceYear {
        &self.reference_year
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Current input with the recognized date token removed.
    pub fn cleaned_input(&self) -> &str {
        &self.cleaned_input
    }

    pub fn recognized_date(&self) -> Option<NaiveDate> {
        self.recognized
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn open(&mut self) {
        if self.state != CaptureState::Idle {
            log::warn!("Capture session opened twice (state {:?})", self.state);
            return;
        }
        self.surface.set_title(&self.title);
        self.surface.show_preview("");
        self.state = CaptureState::Editing;
    }

    pub fn handle(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Input(text) => self.input(&text),
            CaptureEvent::Commit => self.commit(),
            CaptureEvent::Cancel => self.cancel(),
        }
    }

    /// Re-evaluate the whole input. Nothing from the previous keystroke is reused.
    pub fn input(&mut self, text: &str) {
        if self.state != CaptureState::Editing {
            log::warn!("Ignoring input while capture session is {:?}", self.state);
            return;
        }
        let now = (self.clock)();
        let matched = recognize_date(text, &self.reference_year, now);

        self.raw_input = text.to_string();
        self.cleaned_input = matched.cleaned;
        self.recognized = matched.date;

        let preview = self.recognized.map(format_preview).unwrap_or_default();
        self.surface.show_preview(&preview);
    }

    /// Finish the capture and hand the record to the completion handler.
    ///
    /// Only the first commit of an editing session has an effect.
    ///
    /// # Panics
    ///
    /// Panics when no handler was registered with [`CaptureSession::on_enter`].
    pub fn commit(&mut self) {
        if self.state != CaptureState::Editing {
            log::debug!("Commit ignored while capture session is {:?}", self.state);
            return;
        }
        let Some(handler) = self.handler.take() else {
            panic!("capture session committed without a completion handler");
        };

        let (description, tags) = extract_tags(&self.cleaned_input);
        let record = CaptureRecord {
            description,
            date: self.recognized,
            tags,
        };
        self.state = CaptureState::Committed;
        log::debug!("Capture committed: {:?}", record);

        handler(record);
        self.surface.close();
    }

    /// Close without producing a record. Captured text is dropped.
    pub fn cancel(&mut self) {
        if self.state.is_finished() {
            return;
        }
        self.raw_input.clear();
        self.cleaned_input.clear();
        self.recognized = None;
        self.handler = None;
        self.state = CaptureState::Cancelled;
        self.surface.close();
    }
}
