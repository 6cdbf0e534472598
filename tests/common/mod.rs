#![allow(dead_code)]

use payorder::application::lifecycle::LifecycleManager;
use payorder::domain::pay_string::Merchant;
use payorder::infrastructure::in_memory::InMemoryOrderStore;
use std::sync::Arc;

pub fn merchant() -> Merchant {
    Merchant {
        upi_id: "flashcards@paytm".to_string(),
        name: "AI Flashcards".to_string(),
        note_prefix: "Premium Plan".to_string(),
    }
}

pub fn manager() -> LifecycleManager {
    LifecycleManager::new(Box::new(InMemoryOrderStore::new()), merchant())
}

pub fn shared_manager() -> Arc<LifecycleManager> {
    Arc::new(manager())
}
