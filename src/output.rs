use tasklist::Task;

fn push_fields(out: &mut String, task: &Task) {
    if let Some(desc) = &task.description {
        out.push_str(&format!("    {desc}\n"));
    }
    out.push_str(&format!("    Priority: {}\n", task.priority));
    if let Some(due) = task.due_date {
        out.push_str(&format!("    Due: {}\n", due.format("%Y-%m-%d")));
    }
}

/// Numbered list; the bracketed id is what `done`/`rm`/`translate` take.
pub fn format_task_list(tasks: &[Task]) -> String {
    let mut out = String::new();
    for (i, task) in tasks.iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        out.push_str(&format!("{}. [{mark}] {}  (#{})\n", i + 1, task.title, task.id));
        push_fields(&mut out, task);
    }
    out
}

pub fn format_sections(pending: &[Task], completed: &[Task]) -> String {
    if pending.is_empty() && completed.is_empty() {
        return "No to-do items yet! Add one with `tasklist add`.\n".to_string();
    }
    let mut out = String::new();
    if !pending.is_empty() {
        out.push_str("Pending Tasks\n");
        out.push_str(&format_task_list(pending));
    }
    if !completed.is_empty() {
        if !pending.is_empty() {
            out.push('\n');
        }
        out.push_str("Completed Tasks\n");
        out.push_str(&format_task_list(completed));
    }
    out
}

pub fn format_task_detail(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("Id:          {}\n", task.id));
    out.push_str(&format!("Title:       {}\n", task.title));
    if let Some(desc) = &task.description {
        out.push_str(&format!("Description: {desc}\n"));
    }
    out.push_str(&format!("Priority:    {}\n", task.priority));
    if let Some(due) = task.due_date {
        out.push_str(&format!("Due:         {}\n", due.format("%Y-%m-%d")));
    }
    let status = if task.completed { "completed" } else { "pending" };
    out.push_str(&format!("Status:      {status}\n"));
    out.push_str(&format!(
        "Created:     {}\n",
        task.created_at.format("%Y-%m-%dT%H:%M:%SZ")
    ));
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tasklist::Priority;

    use super::*;

    fn make_task(id: i64, title: &str, desc: Option<&str>, completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: desc.map(|s| s.to_string()),
            priority: Priority::Medium,
            due_date: None,
            completed,
            created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn list_is_numbered_from_one() {
        let tasks = vec![
            make_task(4, "a", Some("desc A"), false),
            make_task(9, "b", None, false),
        ];
        let out = format_task_list(&tasks);
        assert!(out.starts_with("1. [ ] a  (#4)\n    desc A\n    Priority: Medium\n"));
        assert!(out.contains("2. [ ] b  (#9)\n"));
    }

    #[test]
    fn due_date_is_shown() {
        let mut t = make_task(1, "a", None, false);
        t.due_date = NaiveDate::from_ymd_opt(2025, 1, 10);
        assert!(format_task_list(&[t]).contains("    Due: 2025-01-10\n"));
    }

    #[test]
    fn sections() {
        let pending = vec![make_task(1, "p", None, false)];
        let completed = vec![make_task(2, "c", None, true)];
        let out = format_sections(&pending, &completed);
        let p = out.find("Pending Tasks").unwrap();
        let c = out.find("Completed Tasks").unwrap();
        assert!(p < c);
        assert!(out.contains("1. [x] c  (#2)"));
    }

    #[test]
    fn empty_sections() {
        assert!(format_sections(&[], &[]).starts_with("No to-do items yet"));
    }

    #[test]
    fn detail() {
        let out = format_task_detail(&make_task(3, "t", Some("d"), true));
        assert!(out.contains("Id:          3\n"));
        assert!(out.contains("Description: d\n"));
        assert!(out.contains("Status:      completed\n"));
        assert!(out.contains("Created:     2025-01-01T00:00:00Z\n"));
    }
}
