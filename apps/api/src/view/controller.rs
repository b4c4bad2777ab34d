//! Listing view state machine.
//!
//! The view is either browsing a page or editing one user's email. Every user
//! action and every service response is an `Event`; handling one returns the
//! `Effect`s the caller must carry out (fetch a page, send an update, drop the
//! cached listing). There is no retry, debounce or optimistic update: every
//! finished update invalidates the listing so it is fetched again.

use uuid::Uuid;

use crate::users::pagination::{PageRequest, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Editing { id: Uuid, draft: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    GoToPage(i64),
    PrevPage,
    NextPage,
    SetPageSize(i64),
    /// A listing response arrived.
    Loaded { pages: i64 },
    BeginEdit { id: Uuid, email: String },
    EditDraft(String),
    CommitEdit,
    CancelEdit,
    UpdateSucceeded,
    UpdateFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(PageRequest),
    Update { id: Uuid, email: String },
    Invalidate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Saved,
    SaveFailed(String),
}

#[derive(Debug, Clone)]
pub struct PagerController {
    page: i64,
    page_size: i64,
    /// Page count from the last listing response.
    pages: i64,
    mode: Mode,
    notice: Option<Notice>,
}

impl Default for PagerController {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            pages: 0,
            mode: Mode::Browsing,
            notice: None,
        }
    }
}

impl PagerController {
    /// Controller positioned on `req`, before any listing has loaded.
    pub fn at(req: PageRequest) -> Self {
        Self {
            page: req.page,
            page_size: req.page_size,
            ..Self::default()
        }
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.pages
    }

    /// The page `event` would fetch, without changing this controller.
    /// `None` when the event is disabled or leaves the page unchanged.
    pub fn fetch_target(&self, event: Event) -> Option<PageRequest> {
        self.clone()
            .handle(event)
            .into_iter()
            .find_map(|effect| match effect {
                Effect::Fetch(req) => Some(req),
                _ => None,
            })
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::GoToPage(page) => self.set_page(page.max(1)),
            Event::PrevPage if self.can_go_prev() => self.set_page(self.page - 1),
            Event::NextPage if self.can_go_next() => self.set_page(self.page + 1),
            Event::PrevPage | Event::NextPage => vec![],
            Event::SetPageSize(size) => {
                if !PAGE_SIZE_OPTIONS.contains(&size) || size == self.page_size {
                    return vec![];
                }
                self.page_size = size;
                self.mode = Mode::Browsing;
                vec![Effect::Invalidate, Effect::Fetch(self.request())]
            }
            Event::Loaded { pages } => {
                self.pages = pages.max(0);
                vec![]
            }
            Event::BeginEdit { id, email } => {
                self.mode = Mode::Editing { id, draft: email };
                vec![]
            }
            Event::EditDraft(text) => {
                if let Mode::Editing { draft, .. } = &mut self.mode {
                    *draft = text;
                }
                vec![]
            }
            Event::CommitEdit => match std::mem::replace(&mut self.mode, Mode::Browsing) {
                Mode::Editing { id, draft } => vec![Effect::Update { id, email: draft }],
                Mode::Browsing => vec![],
            },
            Event::CancelEdit => {
                self.mode = Mode::Browsing;
                vec![]
            }
            Event::UpdateSucceeded => {
                self.notice = Some(Notice::Saved);
                vec![Effect::Invalidate, Effect::Fetch(self.request())]
            }
            Event::UpdateFailed(message) => {
                self.notice = Some(Notice::SaveFailed(message));
                vec![Effect::Invalidate, Effect::Fetch(self.request())]
            }
        }
    }

    fn set_page(&mut self, page: i64) -> Vec<Effect> {
        if page == self.page {
            return vec![];
        }
        self.page = page;
        vec![Effect::Fetch(self.request())]
    }
}
