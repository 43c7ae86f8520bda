//! TUI application state machine.
//!
//! Owns the navigation stack, the status line, and the in-flight marker.
//! Key handling turns operator intents into [`Command`]s for the loop to
//! dispatch; result events update the state. Nothing here touches the
//! runtime directly.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use farol_common::error::FarolError;
use farol_common::types::{ActionKind, Container};
use farol_runtime::store::InventoryStore;

use crate::dispatch::ActionRequest;
use crate::event::{AppEvent, TerminalEvent};

/// Operator intents, in button-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start a stopped container.
    Start,
    /// Stop a running container.
    Stop,
    /// Create a new container.
    Create,
    /// Show a container's details and live state.
    Inspect,
    /// Remove a container.
    Remove,
}

impl Intent {
    /// Every intent, in button-bar order.
    pub const ALL: [Self; 5] = [Self::Start, Self::Stop, Self::Create, Self::Inspect, Self::Remove];

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Stop => "Stop",
            Self::Create => "Create",
            Self::Inspect => "Inspect",
            Self::Remove => "Remove",
        }
    }

    /// Keyboard shortcut on the dashboard.
    #[must_use]
    pub const fn shortcut(self) -> char {
        match self {
            Self::Start => 's',
            Self::Stop => 't',
            Self::Create => 'c',
            Self::Inspect => 'i',
            Self::Remove => 'd',
        }
    }

    const fn from_shortcut(c: char) -> Option<Self> {
        match c {
            's' => Some(Self::Start),
            't' => Some(Self::Stop),
            'c' => Some(Self::Create),
            'i' => Some(Self::Inspect),
            'd' => Some(Self::Remove),
            _ => None,
        }
    }

    /// Title of the container picker for this intent.
    #[must_use]
    pub const fn picker_title(self) -> &'static str {
        match self {
            Self::Start => "Start Container",
            Self::Stop => "Stop Container",
            Self::Create => "Create Container",
            Self::Inspect => "Inspect Container",
            Self::Remove => "Remove Container",
        }
    }

    fn request(self, container: Container) -> Option<ActionRequest> {
        match self {
            Self::Start => Some(ActionRequest::Start(container)),
            Self::Stop => Some(ActionRequest::Stop(container)),
            Self::Remove => Some(ActionRequest::Remove(container)),
            Self::Inspect => Some(ActionRequest::Inspect(container)),
            Self::Create => None,
        }
    }
}

/// Container chooser opened by Start, Stop, Inspect, and Remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    /// Intent the chosen container is for.
    pub intent: Intent,
    /// Containers offered, captured when the picker opened.
    pub candidates: Vec<Container>,
    /// Index of the highlighted candidate.
    pub selected: usize,
}

/// Which create-form input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    /// Container name input.
    Name,
    /// Image input.
    Image,
}

/// Input state of the create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    /// Container name typed so far.
    pub name: String,
    /// Image typed so far.
    pub image: String,
    /// Focused input.
    pub focus: CreateField,
}

impl CreateForm {
    const fn new() -> Self {
        Self {
            name: String::new(),
            image: String::new(),
            focus: CreateField::Name,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            CreateField::Name => &mut self.name,
            CreateField::Image => &mut self.image,
        }
    }

    const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            CreateField::Name => CreateField::Image,
            CreateField::Image => CreateField::Name,
        };
    }
}

/// A view on the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Base view: panels and button bar.
    Dashboard,
    /// Choosing a container for an intent.
    Picker(Picker),
    /// Entering name and image for a new container.
    CreateForm(CreateForm),
    /// Inspect result.
    Details {
        /// Record from the snapshot.
        container: Container,
        /// Live running state, `None` when the read failed.
        live_running: Option<bool>,
    },
    /// Error dialog.
    Error {
        /// Dialog title.
        title: String,
        /// Full error text including runtime output.
        message: String,
    },
}

/// Stack of views above the dashboard.
///
/// The dashboard is always at the bottom and cannot be popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    base: View,
    overlays: Vec<View>,
}

impl Navigation {
    const fn new() -> Self {
        Self {
            base: View::Dashboard,
            overlays: Vec::new(),
        }
    }

    /// The topmost view.
    #[must_use]
    pub fn current(&self) -> &View {
        self.overlays.last().unwrap_or(&self.base)
    }

    fn current_mut(&mut self) -> &mut View {
        self.overlays.last_mut().unwrap_or(&mut self.base)
    }

    fn push(&mut self, view: View) {
        self.overlays.push(view);
    }

    fn pop(&mut self) {
        let _ = self.overlays.pop();
    }

    /// Returns to the dashboard.
    fn reset(&mut self) {
        self.overlays.clear();
    }

    /// Number of views including the dashboard.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.overlays.len() + 1
    }
}

/// Contents of the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Nothing has happened yet.
    Ready,
    /// A runtime call is in flight.
    Busy(String),
    /// Last outcome was fine.
    Info(String),
    /// Last outcome was a failure.
    Failed(String),
}

/// Work the loop must hand to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run an action in the background.
    Dispatch(ActionRequest),
    /// Rebuild the inventory in the background.
    Refresh,
}

/// Root application state for the TUI.
#[derive(Debug)]
pub struct App {
    /// Whether the app should continue running.
    pub running: bool,
    /// Open views, dashboard at the bottom.
    pub nav: Navigation,
    /// Highlighted button in the button bar.
    pub selected_button: usize,
    /// Status bar contents.
    pub status: Status,
    store: Arc<InventoryStore>,
    in_flight: bool,
    completed: Option<String>,
}

impl App {
    /// Creates the application state over a loaded store.
    #[must_use]
    pub fn new(store: Arc<InventoryStore>) -> Self {
        Self {
            running: true,
            nav: Navigation::new(),
            selected_button: 0,
            status: Status::Ready,
            store,
            in_flight: false,
            completed: None,
        }
    }

    /// The inventory the panels render.
    #[must_use]
    pub const fn store(&self) -> &Arc<InventoryStore> {
        &self.store
    }

    /// Whether controls are disabled because a runtime call is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Signals the app to quit.
    pub const fn quit(&mut self) {
        self.running = false;
    }

    /// Applies one event and returns work for the dispatcher, if any.
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Terminal(TerminalEvent::Key(key)) => self.handle_key(key),
            AppEvent::Terminal(TerminalEvent::Resize(..)) => None,
            AppEvent::ActionFinished { kind, target, result } => {
                self.on_action_finished(kind, &target, result);
                None
            }
            AppEvent::Inspected { container, running } => {
                self.in_flight = false;
                self.status = Status::Info(format!("Inspected {}", container.name));
                self.nav.reset();
                self.nav.push(View::Details {
                    container,
                    live_running: running,
                });
                None
            }
            AppEvent::Refreshed(result) => {
                self.in_flight = false;
                match result {
                    Ok(snapshot) => {
                        let refreshed = format!("Refreshed at {}", snapshot.taken_at().format("%H:%M:%S"));
                        self.status = Status::Info(match self.completed.take() {
                            Some(done) => format!("{done}. {refreshed}"),
                            None => refreshed,
                        });
                    }
                    Err(e) => {
                        self.completed = None;
                        self.show_error(&e);
                    }
                }
                None
            }
        }
    }

    fn on_action_finished(&mut self, kind: ActionKind, target: &str, result: Result<(), FarolError>) {
        match result {
            Ok(()) => {
                tracing::info!(op = %kind, target, "action succeeded");
                let done = format!("{} {target}", kind.past());
                self.status = Status::Busy(format!("{done}. Refreshing..."));
                self.completed = Some(done);
                self.nav.reset();
            }
            Err(e) => {
                self.in_flight = false;
                if !e.is_validation() {
                    self.nav.reset();
                }
                self.show_error(&e);
            }
        }
    }

    fn show_error(&mut self, error: &FarolError) {
        tracing::warn!(error = %error, "showing error to operator");
        self.status = Status::Failed(error.title().to_string());
        self.nav.push(View::Error {
            title: error.title().to_string(),
            message: error.to_string(),
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        match self.nav.current() {
            View::Dashboard => self.dashboard_key(key),
            View::Picker(_) => self.picker_key(key),
            View::CreateForm(_) => self.create_key(key),
            View::Details { .. } | View::Error { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.nav.pop();
                }
                None
            }
        }
    }

    fn dashboard_key(&mut self, key: KeyEvent) -> Option<Command> {
        let buttons = Intent::ALL.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit();
                None
            }
            KeyCode::Right | KeyCode::Tab => {
                self.selected_button = (self.selected_button + 1) % buttons;
                None
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.selected_button = (self.selected_button + buttons - 1) % buttons;
                None
            }
            KeyCode::Enter => {
                let intent = Intent::ALL[self.selected_button % buttons];
                self.open(intent);
                None
            }
            KeyCode::Char('r') => self.begin(Command::Refresh, "Refreshing...".into()),
            KeyCode::Char(c) => {
                if let Some(intent) = Intent::from_shortcut(c) {
                    self.open(intent);
                }
                None
            }
            _ => None,
        }
    }

    fn open(&mut self, intent: Intent) {
        if self.in_flight {
            return;
        }
        if intent == Intent::Create {
            self.nav.push(View::CreateForm(CreateForm::new()));
            return;
        }

        let (candidates, empty) = match intent {
            Intent::Start => (self.store.stopped(), "No stopped containers to start"),
            Intent::Stop => (self.store.running(), "No running containers to stop"),
            _ => (self.store.all(), "No containers"),
        };
        if candidates.is_empty() {
            self.status = Status::Info(empty.to_string());
            return;
        }
        self.nav.push(View::Picker(Picker {
            intent,
            candidates,
            selected: 0,
        }));
    }

    fn picker_key(&mut self, key: KeyEvent) -> Option<Command> {
        let View::Picker(picker) = self.nav.current_mut() else {
            return None;
        };
        let len = picker.candidates.len();
        match key.code {
            KeyCode::Esc => {
                self.nav.pop();
                None
            }
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                picker.selected = (picker.selected + 1) % len;
                None
            }
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                picker.selected = (picker.selected + len - 1) % len;
                None
            }
            KeyCode::Enter => {
                let chosen = picker.candidates.get(picker.selected).cloned()?;
                let request = picker.intent.request(chosen)?;
                let busy = format!("{} {}...", request.kind().progressive(), request.target());
                self.begin(Command::Dispatch(request), busy)
            }
            _ => None,
        }
    }

    fn create_key(&mut self, key: KeyEvent) -> Option<Command> {
        let View::CreateForm(form) = self.nav.current_mut() else {
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                self.nav.pop();
                None
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                form.toggle_focus();
                None
            }
            KeyCode::Backspace => {
                let _ = form.focused_mut().pop();
                None
            }
            KeyCode::Char(c) => {
                form.focused_mut().push(c);
                None
            }
            KeyCode::Enter => {
                let request = ActionRequest::Create {
                    name: form.name.clone(),
                    image: form.image.clone(),
                };
                let busy = format!("Creating {}...", form.name.trim());
                self.begin(Command::Dispatch(request), busy)
            }
            _ => None,
        }
    }

    fn begin(&mut self, command: Command, busy: String) -> Option<Command> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.status = Status::Busy(busy);
        Some(command)
    }
}
