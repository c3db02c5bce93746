use crate::Error;
use std::{
    future::Future,
    sync::mpsc::{channel, Receiver, Sender},
    thread::spawn,
};
use tokio::runtime::Runtime;

type Outcome = (&'static str, Result<(), Error>);

/// Runs each task on its own thread with its own tokio runtime.
#[derive(Debug)]
pub struct Executor {
    sender: Sender<Outcome>,
    receiver: Receiver<Outcome>,
}

impl Executor {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    pub fn spawn_runtime<F, State>(&mut self, name: &'static str, state: State, f: impl FnOnce(State) -> F + 'static + Send)
    where
        F: Future<Output = Result<(), Error>>,
        State: 'static + Send + Sync,
    {
        let sender = self.sender.clone();
        spawn(move || {
            let result = match Runtime::new() {
                Ok(runtime) => spawn(move || runtime.block_on(f(state)))
                    .join()
                    .unwrap_or_else(|_| Err(Error::new("task panicked"))),
                Err(error) => Err(Error::new(format!("Cannot start runtime: {}", error))),
            };
            #[allow(unused_must_use)]
            {
                sender.send((name, result));
            };
        });
    }

    /// Waits for every task; the first failure is returned once all have finished.
    pub fn join(self) -> Result<(), Error> {
        drop(self.sender);
        let mut outcome = Ok(());
        while let Ok((name, result)) = self.receiver.recv() {
            if let Err(error) = result {
                if outcome.is_ok() {
                    outcome = Err(Error::new(format!("{}: {}", name, error)));
                }
            }
        }
        outcome
    }
}
