use sqlx::PgPool;
use tracing::info;

use crate::auth::password::hash_password;
use crate::auth::repo::User;
use crate::auth::role::Role;
use crate::questions::repo::{self as questions_repo, Difficulty, QuestionInput};
use crate::submissions::repo::{self as submissions_repo, SubmissionStatus};

/// Seeds the demo dataset when the database is empty: two accounts
/// (password `password`), three questions, and a few submissions so the
/// dashboards have something to show.
pub async fn seed_if_empty(db: &PgPool) -> anyhow::Result<()> {
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;
    if users > 0 {
        return Ok(());
    }

    info!("empty database, seeding demo data");
    let hash = hash_password("password")?;

    let student = User::create(
        db,
        "Arun Kumar",
        "student@panimalar.edu",
        &hash,
        Role::Student,
        Some("Computer Science"),
        Some("19CSE101"),
    )
    .await?;

    let staff = User::create(
        db,
        "Dr. Priya Rajan",
        "staff@panimalar.edu",
        &hash,
        Role::Staff,
        Some("Computer Science"),
        None,
    )
    .await?;

    let two_sum = questions_repo::create(
        db,
        staff.id,
        &QuestionInput {
            title: "Two Sum".into(),
            description: "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.".into(),
            difficulty: Difficulty::Easy,
            tags: vec!["arrays".into(), "hash-table".into()],
            sample_input: Some("[2,7,11,15], target = 9".into()),
            sample_output: Some("[0,1]".into()),
            constraints: Some("You may assume that each input would have exactly one solution, and you may not use the same element twice.".into()),
        },
    )
    .await?;

    let level_order = questions_repo::create(
        db,
        staff.id,
        &QuestionInput {
            title: "Binary Tree Level Order Traversal".into(),
            description: "Given the root of a binary tree, return the level order traversal of its nodes values.".into(),
            difficulty: Difficulty::Medium,
            tags: vec!["binary-tree".into(), "bfs".into()],
            sample_input: Some("root = [3,9,20,null,null,15,7]".into()),
            sample_output: Some("[[3],[9,20],[15,7]]".into()),
            constraints: Some("The number of nodes in the tree is in the range [0, 2000].".into()),
        },
    )
    .await?;

    questions_repo::create(
        db,
        staff.id,
        &QuestionInput {
            title: "Merge K Sorted Lists".into(),
            description: "You are given an array of k linked-lists lists, each linked-list is sorted in ascending order. Merge all the linked-lists into one sorted linked-list and return it.".into(),
            difficulty: Difficulty::Hard,
            tags: vec!["linked-list".into(), "heap".into()],
            sample_input: Some("lists = [[1,4,5],[1,3,4],[2,6]]".into()),
            sample_output: Some("[1,1,2,3,4,4,5,6]".into()),
            constraints: Some("k == lists.length, 0 <= k <= 10^4".into()),
        },
    )
    .await?;

    submissions_repo::create(
        db,
        student.id,
        two_sum.id,
        "python",
        "def twoSum(nums, target):\n    seen = {}\n    for i, num in enumerate(nums):\n        complement = target - num\n        if complement in seen:\n            return [seen[complement], i]\n        seen[num] = i",
        SubmissionStatus::Accepted,
    )
    .await?;

    submissions_repo::create(
        db,
        student.id,
        level_order.id,
        "java",
        "class Solution {\n  public List<List<Integer>> levelOrder(TreeNode root) {\n    // breadth-first walk, one list per level\n    return result;\n  }\n}",
        SubmissionStatus::Wrong,
    )
    .await?;

    submissions_repo::create(
        db,
        student.id,
        two_sum.id,
        "c",
        "int* twoSum(int* nums, int numsSize, int target, int* returnSize) {\n    *returnSize = 2;\n    /* quadratic scan */\n}",
        SubmissionStatus::Accepted,
    )
    .await?;

    info!("demo data seeded");
    Ok(())
}
