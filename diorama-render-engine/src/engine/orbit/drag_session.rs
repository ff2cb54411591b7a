/// Single-pointer drag tracking. Only one session exists at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    last_pointer_x: f64,
    active: bool,
}

impl DragSession {
    /// Start (or restart) the session at `client_x`.
    pub fn begin(&mut self, client_x: f64) {
        self.last_pointer_x = client_x;
        self.active = true;
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_pointer_x(&self) -> f64 {
        self.last_pointer_x
    }

    pub fn set_last_pointer_x(&mut self, client_x: f64) {
        self.last_pointer_x = client_x;
    }
}
