use dialog_await::{
    async_trait, Artifact, ArtifactRequest, DialogConfig, DialogSession, HostSurface,
    TeardownHook, TeardownObserver,
};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

struct Printed {
    request: ArtifactRequest,
    teardown: TeardownHook,
}

impl Artifact for Printed {
    fn on_teardown(&self, observer: TeardownObserver) {
        self.teardown.register(observer);
    }
}

/// Prints dialogs to stdout, and has a pretend user pick the preferred option
/// after `patience`, or walk away if there is none.
struct Console {
    patience: Duration,
    modal: Mutex<Option<Arc<Printed>>>,
}

#[async_trait]
impl HostSurface for Console {
    type Artifact = Printed;

    fn build_artifact(&self, request: ArtifactRequest) -> Printed {
        Printed {
            request,
            teardown: TeardownHook::new(),
        }
    }

    async fn display_modal(&self, artifact: Arc<Printed>, _animated: bool) {
        let request = &artifact.request;
        if let Some(title) = &request.config.title {
            println!("== {title} ==");
        }
        if let Some(message) = &request.config.message {
            println!("{message}");
        }
        for (index, action) in request.actions.iter().enumerate() {
            let marker = if request.preferred == Some(index) { "*" } else { " " };
            println!(" {marker} [{}]", action.label());
        }
        *self.modal.lock().unwrap() = Some(artifact);
    }

    async fn dismiss_modal(&self, _artifact: Arc<Printed>, _animated: bool) {
        println!("(dialog dismissed)");
        self.modal.lock().unwrap().take();
    }
}

impl Console {
    async fn pretend_user(self: Arc<Self>) {
        tokio::time::sleep(self.patience).await;
        let Some(shown) = self.modal.lock().unwrap().take() else {
            return;
        };
        match shown.request.preferred {
            Some(index) => {
                let action = &shown.request.actions[index];
                println!("(user picks {})", action.label());
                action.activate();
            }
            None => println!("(user walks away)"),
        }
    }
}

fn ask(title: &str) -> DialogSession<bool, Console> {
    let config = DialogConfig::new()
        .title(title)
        .message("Unsaved changes will be lost.");
    let mut session = DialogSession::with_config(false, config);
    session
        .add_preferred_option("Proceed", true)
        .add_option("Cancel", false);
    session
}

#[tokio::main]
async fn main() {
    let console = Arc::new(Console {
        patience: Duration::from_millis(200),
        modal: Mutex::new(None),
    });

    // present and wait in one call
    tokio::spawn(Arc::clone(&console).pretend_user());
    let proceed = ask("Close window?")
        .present_and_await(Arc::clone(&console))
        .await;
    println!("proceed: {proceed}");

    // present here, wait somewhere else
    let mut session = ask("Discard draft?");
    session.present(Arc::clone(&console)).await;
    let session = Arc::new(session);
    let waiter = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.await_result().await }
    });
    session.dismiss().await;
    println!("proceed: {}", waiter.await.unwrap_or(false));
}
