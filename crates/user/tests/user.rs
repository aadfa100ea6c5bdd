mod helpers;

use reptrack_shared::Error;
use reptrack_user::{Command, CreateUserInput, Query};
use temp_dir::TempDir;

#[tokio::test]
async fn test_create_and_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;
    let command = Command(pool.clone());
    let query = Query(pool);

    let james = command
        .create(CreateUserInput {
            name: "James".to_owned(),
            email: "James@Reptrack.localhost".to_owned(),
        })
        .await?;
    let ana = command
        .create(CreateUserInput {
            name: "Ana".to_owned(),
            email: "ana@reptrack.localhost".to_owned(),
        })
        .await?;

    let users = query.list().await?;
    assert_eq!(users.len(), 2);
    assert!(users.iter().any(|u| u.id == james));
    assert!(users.iter().any(|u| u.id == ana));

    let found = query.find_by_email("james@reptrack.localhost").await?.unwrap();
    assert_eq!(found.name, "James");
    assert_eq!(found.email, "james@reptrack.localhost");

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_duplicate_email() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;
    let command = Command(pool.clone());

    command
        .create(CreateUserInput {
            name: "James".to_owned(),
            email: "james@reptrack.localhost".to_owned(),
        })
        .await?;

    let err = command
        .create(CreateUserInput {
            name: "Other".to_owned(),
            email: "JAMES@reptrack.localhost".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    assert_eq!(Query(pool).list().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_create_validates_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let pool = helpers::setup_test_pool(path).await?;
    let command = Command(pool);

    let err = command
        .create(CreateUserInput {
            name: "  ".to_owned(),
            email: "james@reptrack.localhost".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    let err = command
        .create(CreateUserInput {
            name: "James".to_owned(),
            email: "not-an-email".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    Ok(())
}
