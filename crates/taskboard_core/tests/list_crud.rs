use rusqlite::Connection;
use taskboard_core::db::open_db_in_memory;
use taskboard_core::{
    BoardService, EntityKind, ListService, NewTaskList, ServiceError, SqliteBoardRepository,
    SqliteTaskListRepository, TaskListPatch,
};

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn list_service(
    conn: &Connection,
) -> ListService<SqliteTaskListRepository<'_>, SqliteBoardRepository<'_>> {
    ListService::new(
        SqliteTaskListRepository::try_new(conn).unwrap(),
        SqliteBoardRepository::try_new(conn).unwrap(),
    )
}

fn new_list(title: &str, position: Option<i64>) -> NewTaskList {
    NewTaskList {
        title: Some(title.to_string()),
        position,
    }
}

#[test]
fn create_defaults_position_to_zero() {
    let conn = setup();
    let board = BoardService::new(SqliteBoardRepository::try_new(&conn).unwrap())
        .create_board("Sprint")
        .unwrap();
    let service = list_service(&conn);

    let list = service.create_list(board.id, new_list("Todo", None)).unwrap();
    assert_eq!(list.position, 0);
    assert_eq!(list.board_id, board.id);
    assert_eq!(list.title, "Todo");
}

#[test]
fn create_under_missing_board_returns_not_found() {
    let conn = setup();
    let service = list_service(&conn);

    let err = service
        .create_list(77, new_list("Orphan", Some(1)))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::Board,
            id: 77
        }
    ));
}

#[test]
fn list_by_board_sorts_by_position_and_scopes_to_board() {
    let conn = setup();
    let boards = BoardService::new(SqliteBoardRepository::try_new(&conn).unwrap());
    let board = boards.create_board("Main").unwrap();
    let other = boards.create_board("Other").unwrap();
    let service = list_service(&conn);

    let done = service.create_list(board.id, new_list("Done", Some(2))).unwrap();
    let todo = service.create_list(board.id, new_list("Todo", Some(0))).unwrap();
    let doing = service.create_list(board.id, new_list("Doing", Some(1))).unwrap();
    service.create_list(other.id, new_list("Elsewhere", Some(0))).unwrap();

    let ids: Vec<_> = service
        .list_by_board(board.id)
        .unwrap()
        .into_iter()
        .map(|list| list.id)
        .collect();
    assert_eq!(ids, vec![todo.id, doing.id, done.id]);
}

#[test]
fn equal_positions_keep_insertion_order() {
    let conn = setup();
    let board = BoardService::new(SqliteBoardRepository::try_new(&conn).unwrap())
        .create_board("Ties")
        .unwrap();
    let service = list_service(&conn);

    let first = service.create_list(board.id, new_list("a", None)).unwrap();
    let second = service.create_list(board.id, new_list("b", None)).unwrap();

    let lists = service.list_by_board(board.id).unwrap();
    assert_eq!(lists[0].id, first.id);
    assert_eq!(lists[1].id, second.id);
}

#[test]
fn list_by_unknown_board_is_empty() {
    let conn = setup();
    let service = list_service(&conn);

    assert!(service.list_by_board(12345).unwrap().is_empty());
}

#[test]
fn partial_update_only_touches_supplied_fields() {
    let conn = setup();
    let board = BoardService::new(SqliteBoardRepository::try_new(&conn).unwrap())
        .create_board("Patch")
        .unwrap();
    let service = list_service(&conn);
    let list = service.create_list(board.id, new_list("Todo", Some(5))).unwrap();

    let renamed = service
        .update_list(
            list.id,
            &TaskListPatch {
                title: Some("Backlog".to_string()),
                position: None,
            },
        )
        .unwrap();
    assert_eq!(renamed.title, "Backlog");
    assert_eq!(renamed.position, 5);

    let moved = service
        .update_list(
            list.id,
            &TaskListPatch {
                title: None,
                position: Some(1),
            },
        )
        .unwrap();
    assert_eq!(moved.title, "Backlog");
    assert_eq!(moved.position, 1);

    let stored = service.list_by_board(board.id).unwrap();
    assert_eq!(stored, vec![moved]);
}

#[test]
fn update_missing_list_returns_not_found() {
    let conn = setup();
    let service = list_service(&conn);

    let err = service
        .update_list(3, &TaskListPatch::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntityKind::TaskList,
            id: 3
        }
    ));
}

#[test]
fn delete_removes_list_and_is_noop_when_missing() {
    let conn = setup();
    let board = BoardService::new(SqliteBoardRepository::try_new(&conn).unwrap())
        .create_board("Del")
        .unwrap();
    let service = list_service(&conn);
    let list = service.create_list(board.id, new_list("Gone", None)).unwrap();

    service.delete_list(list.id).unwrap();
    service.delete_list(list.id).unwrap();

    assert!(service.list_by_board(board.id).unwrap().is_empty());
}
