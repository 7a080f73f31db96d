//! Event handling module for the terminal UI
//!
//! Terminal input is read on a background thread and forwarded over a
//! channel, so the UI can block on it and still shut the reader down
//! cleanly when it goes away.
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use log::{debug, error};

/// Events that can be processed by the UI
#[derive(Debug, Clone, Copy)]
pub enum Event
{
    /// Keyboard input event
    Key(KeyEvent),
    /// Terminal resize event with new dimensions
    Resize(u16, u16),
}

/// Handles terminal events
///
/// Manages event handling in a separate thread and provides
/// a way to receive events through a channel.
pub struct EventHandler
{
    /// Receiver side of the event channel to get events from the handler thread
    event_receiver: mpsc::Receiver<Event>,
    /// Sender for shutdown the thread for graceful shutdown
    shutdown_sender: mpsc::Sender<()>,
    /// Handle to keep the thread alive
    // Option so `drop` can take it out and join
    thread_handle: Option<JoinHandle<()>>,
}

impl EventHandler
{
    /// Creates a new event handler
    ///
    /// # Arguments
    ///
    /// * `poll_interval` - How long the reader waits for input before
    ///   checking for shutdown
    ///
    /// # Returns
    ///
    /// A new `EventHandler` instance with a running background thread
    #[must_use]
    pub fn new(poll_interval: Duration) -> Self
    {
        let (event_sender, event_receiver) = mpsc::channel();
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            loop
            {
                if shutdown_receiver.try_recv().is_ok()
                {
                    break;
                }

                let is_ready = match event::poll(poll_interval)
                {
                    Ok(is_ready) => is_ready,
                    Err(err) =>
                    {
                        error!("Error polling terminal events: {err}");
                        break;
                    }
                };

                if !is_ready
                {
                    continue;
                }

                let forwarded = match event::read()
                {
                    Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                    Ok(CrosstermEvent::Resize(width, height)) => Some(Event::Resize(width, height)),
                    // Ignore other event types
                    Ok(_) => None,
                    Err(err) =>
                    {
                        error!("Error reading terminal event: {err}");
                        break;
                    }
                };

                // Break the loop if sending fails (receiver dropped)
                if let Some(forwarded) = forwarded
                {
                    if event_sender.send(forwarded).is_err()
                    {
                        break;
                    }
                }
            }
        });

        Self {
            event_receiver,
            shutdown_sender,
            thread_handle: Some(handle),
        }
    }

    /// Gets the next event from the event channel
    ///
    /// This method blocks until an event is available
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is disconnected.
    pub fn next(&self) -> Result<Event>
    {
        self.event_receiver
            .recv()
            .context("Event channel disconnected")
    }

    /// Discards events that arrived while nobody was listening, such as
    /// keys pressed during a network fetch.
    pub fn drain(&self)
    {
        let discarded = self.event_receiver.try_iter().count();
        if discarded > 0
        {
            debug!("Discarded {discarded} stale terminal events");
        }
    }
}

impl Drop for EventHandler
{
    fn drop(&mut self)
    {
        // Signal shutdown (ignore if already closed)
        let _ = self.shutdown_sender.send(());

        if let Some(handle) = self.thread_handle.take()
        {
            let _ = handle.join();
        }
    }
}
