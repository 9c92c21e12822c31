//! Line-oriented command loop over any reader/writer pair.
//!
//! Commands: menu, show, add, remove, edit, mark, clear, save, exit.
//! End of input behaves like `exit`.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

use crate::learning_store::LearningStore;
use crate::task::{classify_and_build, Task};
use crate::task_list::{AddOutcome, MarkOutcome, TaskList};

const MENU: &str = "Welcome to TaskManager!\n\
our commands :\n\
<show> to show your current tasks\n\
<add> to add a task to the calendar\n\
<remove> to remove a task [goes by task number]\n\
<edit> to edit a task name\n\
<mark> to mark the task as done\n\
<clear> to clear your done tasks\n\
<save> to save your task on the calendar\n\
<menu> to go back to the menu\n\
<exit> to quit";

/// One-line rendering used by `show` and the one-shot CLI commands
pub fn format_task(num: usize, task: &Task) -> String {
    format!(
        "{}. {} | Priority: {} | Category: {} | Created: {}",
        num, task.task_name, task.priority, task.category, task.created_at
    )
}

pub struct Session<'a, R, W> {
    list: TaskList,
    store: &'a dyn LearningStore,
    tasks_file: PathBuf,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        list: TaskList,
        store: &'a dyn LearningStore,
        tasks_file: impl Into<PathBuf>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            list,
            store,
            tasks_file: tasks_file.into(),
            input,
            output,
        }
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    /// Run until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", MENU)?;

        while let Some(command) = self.prompt("Enter your choice")? {
            match command.to_lowercase().as_str() {
                "exit" => break,
                "" => {}
                "menu" => writeln!(self.output, "{}", MENU)?,
                "show" => {
                    self.list.sort();
                    self.show()?;
                }
                "add" => self.add()?,
                "edit" => self.edit()?,
                "mark" => self.mark()?,
                "remove" => self.remove()?,
                "clear" => {
                    let cleared = self.list.clear_done();
                    writeln!(self.output, "Done tasks have been cleared. ({})", cleared)?;
                }
                "save" => self.save()?,
                other => writeln!(
                    self.output,
                    "Unknown command '{}'. Type <menu> to see the commands",
                    other
                )?,
            }
        }

        writeln!(self.output, "GoodBye")?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a task number. `None` on end of input or a non-number.
    fn prompt_number(&mut self, message: &str) -> Result<Option<usize>> {
        let Some(answer) = self.prompt(message)? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.output, "You must enter a valid number")?;
                Ok(None)
            }
        }
    }

    fn show(&mut self) -> Result<()> {
        if self.list.is_empty() {
            writeln!(self.output, "No Tasks on the calendar")?;
            return Ok(());
        }
        for (i, task) in self.list.tasks().iter().enumerate() {
            writeln!(self.output, "{}", format_task(i + 1, task))?;
        }
        Ok(())
    }

    fn show_for_selection(&mut self) -> Result<()> {
        writeln!(self.output, "Heres your tasks :")?;
        self.show()
    }

    fn add(&mut self) -> Result<()> {
        let Some(raw) = self.prompt("Enter your new task name")? else {
            return Ok(());
        };

        let task = match classify_and_build(self.store, &raw) {
            Ok(task) => task,
            Err(e) => {
                warn!(error = %e, "failed to classify task");
                writeln!(self.output, "Error: {:#}", e)?;
                return Ok(());
            }
        };

        let added = match self.list.add(task.clone()) {
            AddOutcome::Added => true,
            AddOutcome::Duplicate(task) => {
                writeln!(self.output, "You already have that task in your tasks")?;
                let answer = self.prompt("Wanna add it again? press 'y' to add again:")?;
                if answer.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
                    self.list.force_add(task);
                    true
                } else {
                    false
                }
            }
        };

        if added {
            writeln!(
                self.output,
                "Task: '{}' Added! [Priority: {}, Category: {}]",
                task.task_name, task.priority, task.category
            )?;
        }
        Ok(())
    }

    fn edit(&mut self) -> Result<()> {
        self.show_for_selection()?;
        let Some(num) = self.prompt_number("Enter task number to edit:")? else {
            return Ok(());
        };
        if num == 0 || num > self.list.len() {
            writeln!(self.output, "Invalid task number")?;
            return Ok(());
        }
        let Some(new_name) = self.prompt("Enter the new name for the task:")? else {
            return Ok(());
        };
        match self.list.edit(num, new_name.clone()) {
            Ok(old) => writeln!(
                self.output,
                "Task {} changed from '{}' to '{}'",
                num, old, new_name
            )?,
            Err(e) => writeln!(self.output, "{}. Edit failed.", e)?,
        }
        Ok(())
    }

    fn mark(&mut self) -> Result<()> {
        self.show_for_selection()?;
        let mut num = match self.prompt_number("Enter task number to be marked")? {
            Some(n) => n,
            None => return Ok(()),
        };

        loop {
            match self.list.mark_done(num) {
                Ok(MarkOutcome::Marked(name)) => {
                    writeln!(self.output, "Task: ({}) has been marked", name)?;
                    return Ok(());
                }
                Ok(MarkOutcome::AlreadyDone(name)) => {
                    writeln!(self.output, "Task: ({}) is already marked", name)?;
                    return Ok(());
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }

            let again = self.prompt("Do you want to try again? ( y / n )")?;
            if !again.is_some_and(|a| a.eq_ignore_ascii_case("y")) {
                return Ok(());
            }
            num = match self.prompt_number("Enter task number")? {
                Some(n) => n,
                None => return Ok(()),
            };
        }
    }

    fn remove(&mut self) -> Result<()> {
        self.show_for_selection()?;
        let Some(num) = self.prompt_number("Enter task number to be removed")? else {
            return Ok(());
        };
        match self.list.remove(num) {
            Ok(task) => writeln!(self.output, "Task '{}' has been removed", task.task_name)?,
            Err(e) => writeln!(self.output, "{}", e)?,
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.list.sort();
        match self.list.save_to_file(&self.tasks_file) {
            Ok(()) => writeln!(
                self.output,
                "Data written to {} successfully.",
                self.tasks_file.display()
            )?,
            Err(e) => {
                warn!(error = %e, "failed to save task list");
                writeln!(self.output, "Error: {:#}", e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning_store::MemoryLearningStore;
    use std::io::Cursor;

    fn run_script(script: &str, list: TaskList) -> (TaskList, String) {
        let store = MemoryLearningStore::new();
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let mut session = Session::new(
            list,
            &store,
            dir.path().join("TaskManager.json"),
            Cursor::new(script.to_string()),
            &mut out,
        );
        session.run().unwrap();
        let list = session.list().clone();
        drop(session);
        (list, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_add_show_exit() {
        let (list, out) = run_script("add\nurgent buy milk\nshow\nexit\n", TaskList::new());

        assert_eq!(list.len(), 1);
        assert!(out.contains("Task: 'urgent buy milk' Added! [Priority: 5, Category: Home]"));
        assert!(out.contains("1. urgent buy milk | Priority: 5 | Category: Home | Created: "));
        assert!(out.trim_end().ends_with("GoodBye"));
    }

    #[test]
    fn test_duplicate_declined_then_accepted() {
        let (list, out) = run_script(
            "add\ncook\nadd\ncook\nn\nadd\ncook\ny\n",
            TaskList::new(),
        );
        assert_eq!(list.len(), 2);
        assert_eq!(out.matches("You already have that task").count(), 2);
        // the declined copy is not announced
        assert_eq!(out.matches("Task: 'cook' Added!").count(), 2);
    }

    #[test]
    fn test_invalid_numbers_do_not_abort() {
        let (list, out) = run_script(
            "add\ngym\nremove\nabc\nremove\n5\nedit\n9\nmark\n3\nn\nexit\n",
            TaskList::new(),
        );
        assert_eq!(list.len(), 1);
        assert!(out.contains("You must enter a valid number"));
        assert!(out.contains("Invalid task number: 5"));
        assert!(out.contains("Invalid task number\n"));
        assert!(out.contains("Invalid task number: 3"));
    }

    #[test]
    fn test_mark_clear_edit() {
        let (list, out) = run_script(
            "add\nfix sink\nadd\nread book\nmark\n1\nclear\nedit\n1\nread two books\n",
            TaskList::new(),
        );
        assert!(out.contains("Task: (fix sink) has been marked"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.tasks()[0].task_name, "read two books");
    }

    #[test]
    fn test_mark_retry() {
        let (list, _) = run_script("add\ngym\nmark\n4\ny\n1\n", TaskList::new());
        assert!(list.tasks()[0].is_done());
    }

    #[test]
    fn test_unknown_command_and_eof() {
        let (_, out) = run_script("dance", TaskList::new());
        assert!(out.contains("Unknown command 'dance'"));
        assert!(out.trim_end().ends_with("GoodBye"));
    }

    #[test]
    fn test_show_empty() {
        let (_, out) = run_script("show\n", TaskList::new());
        assert!(out.contains("No Tasks on the calendar"));
    }
}
