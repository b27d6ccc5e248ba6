//! Event loop shared by every platform front end.
//!
//! [`Runtime`] owns the three moving parts of a room visit: the [`App`]
//! render state, the [`Bridge`] wrapping the session lifecycle, and a
//! platform [`Driver`] for input, rendering, and SDK transport.
//!
//! Teardown is structural: [`Runtime::run`] closes the session after the
//! loop exits no matter how it exited, so every path out of the room screen
//! releases the SDK resources.

use liveroom_session::RoomProfile;

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// One room visit, from bootstrap to teardown.
///
/// Generic over the platform [`Driver`] so the terminal front end and the
/// test drivers run the same loop.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    bridge: Bridge,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime for one room visit.
    pub fn new(driver: D, profile: RoomProfile) -> Self {
        let app =
            App::new(profile.room_name.clone(), profile.nickname.clone(), profile.role);
        let bridge = Bridge::new(profile);
        Self { driver, app, bridge }
    }

    /// Drive the room until the session asks to leave the screen.
    ///
    /// After an initial render and the bootstrap (permission check, SDK
    /// bring-up), each cycle polls the driver for input, routes the
    /// resulting actions through the bridge, and drains marshaled SDK
    /// callbacks back into the app.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error. The session
    /// is closed and the driver stopped even on the error path.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        let result = self.run_loop().await;
        let teardown = self.close_session().await;
        self.driver.stop();
        result.and(teardown)
    }

    async fn run_loop(&mut self) -> Result<(), D::Error> {
        let granted = self.driver.granted_permissions();
        let events = self.bridge.enter(granted);
        if self.process_bridge_events(events).await? {
            return Ok(());
        }

        loop {
            if self.process_cycle().await? {
                return Ok(());
            }
        }
    }

    /// One poll of the driver plus a drain of pending SDK callbacks.
    ///
    /// Returns `true` once the room screen should close.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let actions = self.driver.poll_event(&mut self.app).await?;
        if self.process_actions(actions).await? {
            return Ok(true);
        }

        while let Some(event) = self.driver.next_sdk_event().await {
            let events = self.bridge.handle_sdk_event(event);
            if self.process_bridge_events(events).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Apply app actions, looping until the queue settles.
    ///
    /// Returns `true` once the room screen should close.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),

                    // Session operations go through the bridge
                    AppAction::SendChat { .. }
                    | AppAction::StartCapture
                    | AppAction::StopCapture
                    | AppAction::SwitchCamera
                    | AppAction::SetBeauty { .. }
                    | AppAction::LeaveRoom => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            let new_actions = self.app.handle(event);
                            pending_actions.extend(new_actions);
                        }
                        if self.flush_commands().await? {
                            return Ok(true);
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Feed bridge output back into the app.
    async fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        let mut quit = self.flush_commands().await?;

        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                quit = true;
            }
        }
        Ok(quit)
    }

    /// Run all queued SDK commands through the driver.
    ///
    /// Returns `true` once the session has asked to leave the screen.
    async fn flush_commands(&mut self) -> Result<bool, D::Error> {
        for command in self.bridge.take_outgoing() {
            self.driver.run_command(command).await?;
        }
        Ok(self.bridge.close_requested())
    }

    /// Close the session and run its teardown commands.
    ///
    /// A session that already closed (or was denied) absorbs the second
    /// close, so this is safe on every exit path.
    async fn close_session(&mut self) -> Result<(), D::Error> {
        let events = self.bridge.close();
        for event in events {
            // Apply final state changes; rendering is pointless mid-teardown.
            let _ = self.app.handle(event);
        }
        let _ = self.flush_commands().await?;
        Ok(())
    }

    /// Current app state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Mutable app state.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// The session bridge.
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}
