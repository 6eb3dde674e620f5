//! Concurrent submission tests.

use contact_client::{ContactClient, ContactForm};
use contact_service::config::ServiceConfig;
use contact_service::persistence::RestGateway;
use std::sync::Arc;

mod common;

use common::{persistence_config, start_row_store, start_service, Behavior};

fn form(i: usize) -> ContactForm {
    ContactForm {
        name: format!("Sender {i}"),
        email: format!("sender{i}@example.com"),
        subject: "Concurrent hello".into(),
        message: format!("Message number {i} sent in parallel."),
    }
}

#[tokio::test]
async fn concurrent_burst_from_one_origin_admits_exactly_the_limit() {
    let (store_addr, store) = start_row_store(Behavior::Healthy).await;
    let gateway = RestGateway::from_config(&persistence_config(store_addr))
        .unwrap()
        .unwrap();
    let (url, shutdown) = start_service(ServiceConfig::default(), gateway).await;
    let client = Arc::new(ContactClient::new(&url).forwarded_for("1.2.3.4"));

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.submit(&form(i)).await })
        })
        .collect();

    let mut accepted = 0;
    let mut limited = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(e) => {
                assert_eq!(e.status(), Some(429));
                limited += 1;
            }
        }
    }

    assert_eq!(accepted, 5);
    assert_eq!(limited, 15);
    assert_eq!(store.rows().len(), 5);

    shutdown.trigger();
}

#[tokio::test]
async fn distinct_origins_are_independent() {
    let (store_addr, store) = start_row_store(Behavior::Healthy).await;
    let gateway = RestGateway::from_config(&persistence_config(store_addr))
        .unwrap()
        .unwrap();
    let (url, shutdown) = start_service(ServiceConfig::default(), gateway).await;

    let tasks: Vec<_> = (0..20)
        .map(|i| {
            let client = ContactClient::new(&url).forwarded_for(&format!("10.0.0.{i}"));
            tokio::spawn(async move { client.submit(&form(i)).await })
        })
        .collect();

    for task in tasks {
        let response = task.await.unwrap().unwrap();
        assert!(response.success);
    }
    assert_eq!(store.rows().len(), 20);

    shutdown.trigger();
}
